pub mod appointment;
pub mod slots;

pub use appointment::AppointmentService;
pub use slots::SlotService;
