pub mod email_delivery;
pub mod postmark_email_client;
pub mod recording_email_client;

pub use email_delivery::EmailDelivery;
pub use postmark_email_client::PostmarkEmailClient;
pub use recording_email_client::{RecordingEmailClient, SentEmail};
