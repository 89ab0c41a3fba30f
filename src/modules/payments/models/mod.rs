mod bill_status;
mod payment_record;

pub use bill_status::BillStatus;
pub use payment_record::{PaymentMethod, PaymentRecord};
