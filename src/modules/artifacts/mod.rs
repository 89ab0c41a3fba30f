// Artifacts module: payment deep links and their QR renderings

pub mod models;
pub mod services;

pub use models::{PayeeDetails, PaymentArtifact, PaymentNote, RequestedAmount};
pub use services::{PaymentArtifactGenerator, QrCodeEncoder};
