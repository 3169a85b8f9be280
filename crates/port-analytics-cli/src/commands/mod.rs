pub mod attribution;
pub mod decomposition;
pub mod returns;
