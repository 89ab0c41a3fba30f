pub mod artifact_generator;
pub mod qr_encoder;

pub use artifact_generator::PaymentArtifactGenerator;
pub use qr_encoder::QrCodeEncoder;
