//! Employee records as the roster screen shows them: decoded dates plus the
//! values derived from them. Nothing here is persisted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "Até 24 anos")]
    UpTo24,
    #[serde(rename = "25 a 34 anos")]
    From25To34,
    #[serde(rename = "35 a 44 anos")]
    From35To44,
    #[serde(rename = "45 a 54 anos")]
    From45To54,
    #[serde(rename = "55 anos ou mais")]
    From55,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::UpTo24,
        AgeBucket::From25To34,
        AgeBucket::From35To44,
        AgeBucket::From45To54,
        AgeBucket::From55,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::UpTo24 => "Até 24 anos",
            AgeBucket::From25To34 => "25 a 34 anos",
            AgeBucket::From35To44 => "35 a 44 anos",
            AgeBucket::From45To54 => "45 a 54 anos",
            AgeBucket::From55 => "55 anos ou mais",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenureBucket {
    #[serde(rename = "menos de 1 ano")]
    UnderOne,
    #[serde(rename = "1 a 4 anos")]
    From1To4,
    #[serde(rename = "5 a 9 anos")]
    From5To9,
    #[serde(rename = "10 a 19 anos")]
    From10To19,
    #[serde(rename = "20 a 29 anos")]
    From20To29,
    #[serde(rename = "30 a 39 anos")]
    From30To39,
    #[serde(rename = "40+")]
    From40,
}

impl TenureBucket {
    pub const ALL: [TenureBucket; 7] = [
        TenureBucket::UnderOne,
        TenureBucket::From1To4,
        TenureBucket::From5To9,
        TenureBucket::From10To19,
        TenureBucket::From20To29,
        TenureBucket::From30To39,
        TenureBucket::From40,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TenureBucket::UnderOne => "menos de 1 ano",
            TenureBucket::From1To4 => "1 a 4 anos",
            TenureBucket::From5To9 => "5 a 9 anos",
            TenureBucket::From10To19 => "10 a 19 anos",
            TenureBucket::From20To29 => "20 a 29 anos",
            TenureBucket::From30To39 => "30 a 39 anos",
            TenureBucket::From40 => "40+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    #[serde(rename = "ID")]
    pub id: Option<i64>,
    #[serde(rename = "NOME")]
    pub name: String,
    #[serde(rename = "CARGO")]
    pub role: String,
    #[serde(rename = "SETOR")]
    pub department: String,
    #[serde(rename = "Unidade")]
    pub unit: String,
    #[serde(rename = "Tipo de Contrato")]
    pub contract_type: String,
    #[serde(rename = "Data Nasc.")]
    pub birth_date: Option<NaiveDateTime>,
    #[serde(rename = "Data Adm.")]
    pub hire_date: Option<NaiveDateTime>,
    #[serde(rename = "Idade")]
    pub age: Option<i32>,
    #[serde(rename = "Tempo de Empresa")]
    pub tenure_years: Option<f64>,
    #[serde(rename = "Faixa Etária")]
    pub age_bucket: Option<AgeBucket>,
    #[serde(rename = "Faixa Tempo Empresa")]
    pub tenure_bucket: Option<TenureBucket>,
}
