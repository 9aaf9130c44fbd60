//! Renders the wake-up memo body.

use std::fmt;

use crate::date::ProgressBar;

/// Everything that goes into one wake-up message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageParts<'a> {
    pub timestamp: &'a str,
    pub day_of_year: u32,
    pub progress_bar: ProgressBar,
    pub quote: &'a str,
}

/// A fully rendered memo body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn compose(parts: &MessageParts<'_>) -> Message {
    Message(format!(
        "今天的起床时间是--{timestamp}。\n\
         \n\
         起床啦。\n\
         \n\
         今天是今年的第 {day_of_year} 天。\n\
         \n\
         {progress_bar}\n\
         \n\
         今天的一句诗:\n\
         \n\
         {quote}\n",
        timestamp = parts.timestamp,
        day_of_year = parts.day_of_year,
        progress_bar = parts.progress_bar,
        quote = parts.quote,
    ))
}
