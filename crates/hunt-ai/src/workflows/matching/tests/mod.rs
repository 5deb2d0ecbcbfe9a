mod common;

mod assessment;
