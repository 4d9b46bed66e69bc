pub mod firebreathers;
