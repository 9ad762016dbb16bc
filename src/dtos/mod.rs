pub mod chatdtos;
pub mod projectdtos;
pub mod userdtos;
