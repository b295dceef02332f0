pub mod aggregate;
pub mod assignment;

pub use aggregate::{Buyer, CreateBuyerDto, UpdateBuyerDto};
pub use assignment::{
    AssignmentDraft, AssignmentError, Installment, InstallmentDraft, InstallmentStatus,
    PropertyAssignment, MAX_INSTALLMENTS, PRICE_TOLERANCE,
};
