mod twilio_media_fetcher;

pub use twilio_media_fetcher::TwilioMediaFetcher;
