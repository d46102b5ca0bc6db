pub mod db;
pub mod slots;
