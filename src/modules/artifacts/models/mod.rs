mod artifact;

pub use artifact::{
    ArtifactKey, PayeeDetails, PaymentArtifact, PaymentLinkRequest, PaymentNote, RequestedAmount,
};
