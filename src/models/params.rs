// src/models/params.rs

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParamsError;

/// Subnet and uids a widget instance tracks, parsed from
/// `"<netuid> | <uid>, <uid>, ..."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetParams {
    pub netuid: u16,
    pub uids: Vec<i64>,
}

impl WidgetParams {
    pub fn parse(input: &str) -> Result<Self, ParamsError> {
        let (netuid_part, uid_part) = input
            .split_once('|')
            .ok_or_else(|| ParamsError::MissingSeparator(input.to_string()))?;
        if uid_part.contains('|') {
            return Err(ParamsError::MissingSeparator(input.to_string()));
        }

        let netuid_part = netuid_part.trim();
        let netuid = netuid_part
            .parse::<u16>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParamsError::InvalidNetuid(netuid_part.to_string()))?;

        if uid_part.trim().is_empty() {
            return Err(ParamsError::NoUids);
        }
        let uids = uid_part
            .split(',')
            .map(|raw| {
                let raw = raw.trim();
                raw.parse::<i64>()
                    .map_err(|_| ParamsError::InvalidUid(raw.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { netuid, uids })
    }
}

impl FromStr for WidgetParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WidgetParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let uids: Vec<String> = self.uids.iter().map(|u| u.to_string()).collect();
        write!(f, "{} | {}", self.netuid, uids.join(", "))
    }
}
