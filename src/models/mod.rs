pub mod chatmodel;
pub mod projectmodel;
pub mod usermodel;
