// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into origin date: `2022-03-01T08:12:34.123456+00:00`
pub fn format_origin_date(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string()
}

/// Seconds since unix epoch, sub-second part truncated.
pub fn unix_timestamp(t: DateTime) -> i64 {
    t.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Timelike;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap()
    }

    #[test]
    fn test_format_origin_date() {
        assert_eq!(
            format_origin_date(test_time()),
            "2022-03-01T08:12:34.123456+00:00"
        );
    }

    #[test]
    fn test_format_origin_date_pads_microseconds() {
        let t = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 5).unwrap();
        assert_eq!(format_origin_date(t), "2024-12-31T23:59:05.000000+00:00");
    }

    #[test]
    fn test_unix_timestamp() {
        assert_eq!(unix_timestamp(test_time()), 1646122354);
    }
}
