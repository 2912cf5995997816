pub mod policy;

pub use policy::LayeringPolicy;
