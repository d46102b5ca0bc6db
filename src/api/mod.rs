pub mod questly;
