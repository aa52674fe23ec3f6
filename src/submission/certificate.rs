//! Participation certificates

use crate::auth::Session;
use crate::hackathon::Hackathon;
use crate::notify::{Notice, Notifier};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub recipient: String,
    pub email: String,
    pub hackathon_id: String,
    pub hackathon_title: String,
    pub issued_on: NaiveDate,
}

/// Issue the signed-in participant's certificate for `hackathon`
pub fn participation_certificate(
    session: &Session,
    hackathon: &Hackathon,
    issued_on: NaiveDate,
    notifier: &dyn Notifier,
) -> Certificate {
    notifier.notify(Notice::info(
        "Certificate Downloaded",
        "Your participation certificate has been downloaded successfully.",
    ));
    Certificate {
        recipient: session.name.clone(),
        email: session.email.clone(),
        hackathon_id: hackathon.id.clone(),
        hackathon_title: hackathon.title.clone(),
        issued_on,
    }
}
