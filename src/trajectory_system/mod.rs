pub mod alignment;
pub mod kinematics;
