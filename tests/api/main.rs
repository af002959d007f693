
mod meals_test;
mod metrics_test;
