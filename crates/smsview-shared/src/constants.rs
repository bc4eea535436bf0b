/// Application name
pub const APP_NAME: &str = "smsview";

/// Country code prefix recognised by the phone number formatter
pub const NANP_PREFIX: &str = "+1";

/// Length of a `+1` number in E.164 form (prefix + 10 national digits)
pub const NANP_E164_LEN: usize = 12;

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Twilio REST API base URL
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Twilio REST API version path segment
pub const TWILIO_API_VERSION: &str = "2010-04-01";
