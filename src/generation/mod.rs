pub mod assigner;
