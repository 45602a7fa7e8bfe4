//! Domain models shared between server and clients

pub mod appointment;
pub mod client;
pub mod inventory;
pub mod note;
pub mod role;
pub mod subcategory;

pub use appointment::{
    Appointment, AppointmentCancel, AppointmentCreate, AppointmentDetail, AppointmentItemDetail,
    AppointmentItemInput, AppointmentStats, AppointmentStatus, AppointmentStatusUpdate,
    AppointmentWithClient, UnknownStatus,
};
pub use client::{Client, ClientCreate, ClientSummary};
pub use inventory::{InventoryAdjustment, InventoryProduct, QuantityAdjust};
pub use note::{AdminNote, AdminNoteUpdate};
pub use role::{Role, UnknownRole};
pub use subcategory::Subcategory;
