pub mod jimeng;
