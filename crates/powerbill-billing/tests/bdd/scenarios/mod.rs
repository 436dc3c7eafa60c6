mod billing_lifecycle;
mod persistence_round_trip;
mod strict_loading;
