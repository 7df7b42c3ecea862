pub fn seconds_to_string(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_owned();
    }

    let mut time_str = String::new();

    let hours = seconds / 3600;
    if hours > 0 {
        time_str += &format!("{}h", hours);
    }
    let minutes = seconds % 3600 / 60;
    if minutes > 0 {
        time_str += &format!("{}m", minutes);
    }
    let seconds = seconds % 60;
    if seconds > 0 {
        time_str += &format!("{}s", seconds);
    }

    time_str
}

/// Countdown display, `HH:MM:SS`
pub fn seconds_to_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds % 3600 / 60,
        seconds % 60
    )
}

pub mod parse_duration {
    use nom::{
        bytes::complete::{tag, take_while1},
        character::complete::digit1,
        combinator::{all_consuming, map_res},
        error::Error,
        IResult,
    };

    /// Parses `XhYmZs` (each part optional, in that order) or plain seconds
    pub fn parse_arg(time: &str) -> Result<u64, String> {
        if let Ok((_, seconds)) = all_consuming(plain_seconds)(time) {
            return positive(seconds);
        }

        match parse_duration(time) {
            Ok(("", Some(duration))) => positive(duration),
            Ok(("", None)) => Err("Duration is too long".to_owned()),
            Ok((remaining, _)) => Err(format!(
                "Could not parse this remaining duration fragment: {remaining}"
            )),
            Err(error) => Err(error.to_string()),
        }
    }

    fn positive(duration: u64) -> Result<u64, String> {
        if duration == 0 {
            Err("Duration must be longer than zero seconds".to_owned())
        } else {
            Ok(duration)
        }
    }

    fn plain_seconds(i: &str) -> IResult<&str, u64> {
        map_res(digit1, str::parse::<u64>)(i)
    }

    /// Total seconds, `None` when the sum does not fit into a `u64`
    pub fn parse_duration(duration: &str) -> IResult<&str, Option<u64>> {
        let (duration, hours) = parse_time(duration, "h", 60 * 60).unwrap_or((duration, Some(0)));
        let (duration, minutes) = parse_time(duration, "m", 60).unwrap_or((duration, Some(0)));
        let (duration, seconds) = parse_time(duration, "s", 1).unwrap_or((duration, Some(0)));

        let total = hours
            .zip(minutes)
            .zip(seconds)
            .and_then(|((hours, minutes), seconds)| hours.checked_add(minutes)?.checked_add(seconds));

        Ok((duration, total))
    }

    fn parse_time<'a>(
        i: &'a str,
        end_tag: &'static str,
        multiplier: u64,
    ) -> IResult<&'a str, Option<u64>> {
        let (i, amount) = take_while1::<_, _, Error<&str>>(|c: char| c.is_ascii_digit())(i)?;
        let (i, _) = tag::<_, _, Error<&str>>(end_tag)(i)?;

        Ok((i, amount.parse::<u64>().ok().and_then(|amount| amount.checked_mul(multiplier))))
    }

    #[cfg(test)]
    mod test {
        use super::parse_arg;

        #[test]
        fn test_correct_times() {
            assert_eq!(parse_arg("1m"), Ok(60));
            assert_eq!(parse_arg("6h7s"), Ok(21607));
            assert_eq!(parse_arg("1h30m"), Ok(5400));
            assert_eq!(parse_arg("300"), Ok(300));
        }

        #[test]
        fn test_incorrect_times() {
            assert!(parse_arg("1s2h").is_err());
            assert!(parse_arg("6d3s").is_err());
            assert!(parse_arg("0s").is_err());
            assert!(parse_arg("").is_err());
            assert_eq!(parse_arg("5124095576030432h"), Err("Duration is too long".to_owned()));
            assert_eq!(parse_arg("99999999999999999999s"), Err("Duration is too long".to_owned()));
            assert_eq!(
                parse_arg("5124095576030412h1200m"),
                Err("Duration is too long".to_owned())
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seconds_to_string() {
        assert_eq!(seconds_to_string(0), "0s");
        assert_eq!(seconds_to_string(300), "5m");
        assert_eq!(seconds_to_string(3661), "1h1m1s");
    }

    #[test]
    fn test_seconds_to_clock() {
        assert_eq!(seconds_to_clock(0), "00:00:00");
        assert_eq!(seconds_to_clock(3725), "01:02:05");
    }
}
