//! 每日固定時間觸發的排程。
//!
//! [`DailySchedule`] 只是「登記」：它記住下一次該執行的時間，本身不會做任何事。
//! 必須有人持續呼叫 [`DailySchedule::run_pending`]（見 `Runner::run_daily`）觸發才會發生；
//! 沒有在跑的輪詢迴圈，登記就只是一個時間戳。

use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt;
use std::str::FromStr;

/// 當地時間的每日觸發點，格式 `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    at: NaiveTime,
}

impl DailyTrigger {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        // %H:%M 也接受單位數小時，額外檢查長度以維持 HH:MM 格式
        if trimmed.len() != 5 {
            return Err(EtlError::ScheduleError {
                message: format!("'{}' is not a HH:MM time", value),
            });
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(Self::new)
            .map_err(|e| EtlError::ScheduleError {
                message: format!("'{}' is not a HH:MM time: {}", value, e),
            })
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// `now` 之後第一個落在觸發時間的當地時刻（今天或明天）
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
        let tz = now.timezone();
        let today = now.date_naive();

        for offset in 0..=2 {
            let candidate = (today + Duration::days(offset)).and_time(self.at);
            if let Some(fire) = resolve_local(&tz, candidate) {
                if fire > *now {
                    return Ok(fire);
                }
            }
        }

        Err(EtlError::ScheduleError {
            message: format!("cannot resolve next {} after {}", self, now.naive_local()),
        })
    }
}

impl Default for DailyTrigger {
    fn default() -> Self {
        Self::new(NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default())
    }
}

impl FromStr for DailyTrigger {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DailyTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at.format("%H:%M"))
    }
}

/// 夏令時間跳過的時段往後挪一小時
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// 已登記的每日工作
#[derive(Debug, Clone)]
pub struct DailySchedule<Tz: TimeZone = Local> {
    trigger: DailyTrigger,
    next_run: DateTime<Tz>,
}

impl<Tz: TimeZone> DailySchedule<Tz> {
    /// 登記觸發點；已過今天的觸發時間就排到明天
    pub fn register(trigger: DailyTrigger, now: &DateTime<Tz>) -> Result<Self> {
        let next_run = trigger.next_fire_after(now)?;
        Ok(Self { trigger, next_run })
    }

    pub fn trigger(&self) -> DailyTrigger {
        self.trigger
    }

    pub fn next_run(&self) -> &DateTime<Tz> {
        &self.next_run
    }

    pub fn is_due(&self, now: &DateTime<Tz>) -> bool {
        *now >= self.next_run
    }

    /// 到期就回傳 true 並把下一次排到 `now` 之後，因此同一天最多觸發一次
    pub fn run_pending(&mut self, now: &DateTime<Tz>) -> Result<bool> {
        if !self.is_due(now) {
            return Ok(false);
        }
        self.next_run = self.trigger.next_fire_after(now)?;
        Ok(true)
    }
}
