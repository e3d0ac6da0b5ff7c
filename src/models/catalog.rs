//! Fixed enumerations the roster form offers.

use serde::{Deserialize, Serialize};

pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "DEV")]
    Dev,
    #[serde(rename = "CRM")]
    Crm,
    #[serde(rename = "STI")]
    Sti,
    #[serde(rename = "ADM")]
    Adm,
    #[serde(rename = "UNI")]
    Uni,
    #[serde(rename = "WEB")]
    Web,
    #[serde(rename = "MKT")]
    Mkt,
    #[serde(rename = "ISM")]
    Ism,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Dev => "DEV",
            Department::Crm => "CRM",
            Department::Sti => "STI",
            Department::Adm => "ADM",
            Department::Uni => "UNI",
            Department::Web => "WEB",
            Department::Mkt => "MKT",
            Department::Ism => "ISM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "CM")]
    Cm,
    #[serde(rename = "PV")]
    Pv,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Cm => "CM",
            Unit::Pv => "PV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "CLT")]
    Clt,
    #[serde(rename = "Estágio")]
    Internship,
    #[serde(rename = "Terceirizado")]
    Outsourced,
    #[serde(rename = "Sócio")]
    Partner,
    #[serde(rename = "Outros")]
    Other,
}

impl ContractType {
    /// Form order, also used to order contract-type charts.
    pub const ALL: [ContractType; 5] = [
        ContractType::Clt,
        ContractType::Internship,
        ContractType::Outsourced,
        ContractType::Partner,
        ContractType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Clt => "CLT",
            ContractType::Internship => "Estágio",
            ContractType::Outsourced => "Terceirizado",
            ContractType::Partner => "Sócio",
            ContractType::Other => "Outros",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("Janeiro"));
        assert_eq!(month_name(12), Some("Dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_enum_wire_names_match_labels() {
        for dept in [Department::Dev, Department::Mkt, Department::Ism] {
            let json = serde_json::to_string(&dept).unwrap();
            assert_eq!(json, format!("\"{}\"", dept.as_str()));
        }
        let parsed: ContractType = serde_json::from_str("\"Estágio\"").unwrap();
        assert_eq!(parsed, ContractType::Internship);
        assert!(serde_json::from_str::<Unit>("\"XX\"").is_err());
    }
}
