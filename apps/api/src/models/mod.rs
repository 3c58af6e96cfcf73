pub mod extraction;
pub mod job_offer;
