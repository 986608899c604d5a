pub mod mountpoint;
