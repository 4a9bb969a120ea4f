mod openweather_client;

pub use openweather_client::OpenWeatherClient;
