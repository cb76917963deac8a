use std::str::FromStr;

use allocation::{Investor, InvestorId, NumericInput};
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::domain::{
    models::{Project, UserId},
    Role, User,
};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub seed: SeedSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    pub secure_cookies: bool,
    pub session_inactivity_days: i64,
    /// Artificial delay applied to every store access, in milliseconds.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedSettings {
    pub users: Vec<SeedUser>,
    pub project: SeedProject,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeedRole {
    Management,
    Investor,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedUser {
    pub id: i32,
    pub role: SeedRole,
    pub investor_id: Option<i64>,
    pub name: String,
    pub mobile_number: String,
    pub password: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedInvestor {
    pub id: i64,
    pub name: String,
    pub amount: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedProject {
    pub name: String,
    pub cost: String,
    pub sell_price: String,
    pub currency: String,
    #[serde(default)]
    pub investors: Vec<SeedInvestor>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("investor user {0} has no investor_id")]
    MissingInvestorId(i32),
}

impl TryFrom<SeedUser> for User {
    type Error = SeedError;

    fn try_from(seed: SeedUser) -> Result<Self, Self::Error> {
        let role = match seed.role {
            SeedRole::Management => Role::Management,
            SeedRole::Investor => {
                let investor_id = seed
                    .investor_id
                    .ok_or(SeedError::MissingInvestorId(seed.id))?;
                Role::Investor(InvestorId::new(investor_id))
            }
        };

        Ok(User {
            id: UserId::new(seed.id),
            role,
            name: seed.name,
            mobile_number: seed.mobile_number,
            password: seed.password,
        })
    }
}

impl From<SeedProject> for Project {
    fn from(seed: SeedProject) -> Self {
        Project {
            name: seed.name,
            cost: seed.cost,
            sell_price: seed.sell_price,
            currency: seed.currency,
            investors: seed
                .investors
                .into_iter()
                .map(|i| Investor::new(i.id, i.name, NumericInput::Text(i.amount)))
                .collect(),
        }
    }
}

impl SeedSettings {
    pub fn users(&self) -> Result<Vec<User>, SeedError> {
        self.users.iter().cloned().map(User::try_from).collect()
    }

    pub fn project(&self) -> Project {
        self.project.clone().into()
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .expect("Failed to parse APP_ENVIRONMENT");
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("BTB")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_user(role: SeedRole, investor_id: Option<i64>) -> SeedUser {
        SeedUser {
            id: 7,
            role,
            investor_id,
            name: "Test".to_string(),
            mobile_number: "0000".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn investor_seed_correlates_to_contribution() {
        let user = User::try_from(seed_user(SeedRole::Investor, Some(2))).unwrap();
        assert_eq!(user.role, Role::Investor(InvestorId::new(2)));
    }

    #[test]
    fn investor_seed_without_contribution_is_rejected() {
        assert!(matches!(
            User::try_from(seed_user(SeedRole::Investor, None)),
            Err(SeedError::MissingInvestorId(7))
        ));
    }

    #[test]
    fn management_seed_ignores_investor_id() {
        let user = User::try_from(seed_user(SeedRole::Management, Some(2))).unwrap();
        assert_eq!(user.role, Role::Management);
    }

    #[test]
    fn environment_names_are_case_insensitive() {
        assert!(matches!(
            Environment::from_str("Production"),
            Ok(Environment::Production)
        ));
        assert!(Environment::from_str("staging").is_err());
    }
}
