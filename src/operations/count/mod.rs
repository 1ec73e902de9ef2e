mod minimum;
mod policy;

pub use minimum::compute_minimum_count;
pub use policy::CountPolicy;
