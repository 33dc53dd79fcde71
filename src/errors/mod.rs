use core::fmt;
use std::error::Error;
use std::fmt::Display;

#[derive(Debug)]
pub struct ElectionError {
	text: String,
	cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, ElectionError>;

pub fn new_err<T>(text: String, cause: String) -> Result<T> {
	Err(ElectionError { text, cause })
}

impl Display for ElectionError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let cause_word = {
			if !self.cause.is_empty() {
				" Cause: ".to_string()
			} else {
				String::new()
			}
		};
		write!(f, "{}.{}{}", self.text, cause_word, self.cause)
	}
}

impl Error for ElectionError {}
