pub mod speciality;

pub use speciality::SpecialityService;
