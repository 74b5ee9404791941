//! Extension pour lire la configuration SEUR depuis seurconfig
//!
//! Le trait `SeurConfigExt` ajoute à `seurconfig::Config` la lecture des
//! identifiants, du compte et des options d'impression, et
//! [`SeurApi::from_config`] construit un client prêt à l'emploi.

use crate::api::{Account, Credentials, Options, SeurApi};
use crate::transport::UreqTransport;
use anyhow::{Result, anyhow};
use seurconfig::Config;
use seurconfig::encryption::{encrypt_password, get_password};
use serde_yaml::Value;
use tracing::info;

/// Trait d'extension pour gérer la configuration SEUR dans seurconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use seurconfig::get_config;
/// use seur::SeurConfigExt;
///
/// let config = get_config();
/// let account = config.get_seur_account()?;
/// println!("CCC: {}", account.ccc);
/// ```
pub trait SeurConfigExt {
    /// Identifiants cit.seur.com (mot de passe déchiffré)
    ///
    /// # Errors
    ///
    /// Retourne une erreur si le nom d'utilisateur n'est pas configuré
    fn get_seur_credentials(&self) -> Result<Credentials>;

    /// Enregistre les identifiants cit.seur.com, mot de passe chiffré
    fn set_seur_credentials(&self, username: &str, password: &str) -> Result<()>;

    /// Identifiants ws.seur.com, `None` s'ils ne sont pas configurés
    fn get_seur_ws_credentials(&self) -> Result<Option<Credentials>>;

    /// Enregistre les identifiants ws.seur.com, mot de passe chiffré
    fn set_seur_ws_credentials(&self, username: &str, password: &str) -> Result<()>;

    fn get_seur_account(&self) -> Result<Account>;

    /// Options d'impression, avec les valeurs par défaut de [`Options`]
    fn get_seur_options(&self) -> Result<Options>;
}

fn read_credentials(config: &Config, section: &str) -> Result<Credentials> {
    let username = config.get_string(&["seur", section, "username"])?;
    let password = config.get_string(&["seur", section, "password"])?;
    let password =
        get_password(&password).map_err(|e| anyhow!("Failed to decrypt password: {}", e))?;

    Ok(Credentials::new(username, password))
}

fn write_credentials(config: &Config, section: &str, username: &str, password: &str) -> Result<()> {
    config.set_value(
        &["seur", section, "username"],
        Value::String(username.to_string()),
    )?;
    config.set_value(
        &["seur", section, "password"],
        Value::String(encrypt_password(password)?),
    )
}

impl SeurConfigExt for Config {
    fn get_seur_credentials(&self) -> Result<Credentials> {
        let credentials = read_credentials(self, "credentials")?;
        if credentials.username.is_empty() {
            return Err(anyhow!("SEUR username not configured"));
        }
        Ok(credentials)
    }

    fn set_seur_credentials(&self, username: &str, password: &str) -> Result<()> {
        write_credentials(self, "credentials", username, password)
    }

    fn get_seur_ws_credentials(&self) -> Result<Option<Credentials>> {
        let credentials = read_credentials(self, "ws_credentials")?;
        Ok(Some(credentials).filter(Credentials::is_complete))
    }

    fn set_seur_ws_credentials(&self, username: &str, password: &str) -> Result<()> {
        write_credentials(self, "ws_credentials", username, password)
    }

    fn get_seur_account(&self) -> Result<Account> {
        let field = |key: &str| self.get_string(&["seur", "account", key]);
        Ok(Account {
            vat: field("vat")?,
            franchise: field("franchise")?,
            seurid: field("seurid")?,
            ci: field("ci")?,
            ccc: field("ccc")?,
        })
    }

    fn get_seur_options(&self) -> Result<Options> {
        let defaults = Options::default();
        let option = |key: &str, default: String| -> Result<String> {
            let value = self.get_string(&["seur", "options", key])?;
            Ok(if value.is_empty() { default } else { value })
        };

        Ok(Options {
            pdf: matches!(
                self.get_value(&["seur", "options", "pdf"]),
                Ok(Value::Bool(true))
            ),
            printer: option("printer", defaults.printer)?,
            printer_model: option("printer_model", defaults.printer_model)?,
            ecb_code: option("ecb_code", defaults.ecb_code)?,
        })
    }
}

impl SeurApi<UreqTransport> {
    /// Crée un client à partir de la configuration
    ///
    /// # Exemple
    ///
    /// ```rust,no_run
    /// use seur::SeurApi;
    ///
    /// let api = SeurApi::from_config(&seurconfig::get_config())?;
    /// println!("{}", api.test_connection()?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_config(config: &Config) -> Result<Self> {
        let is_test = config.get_seur_test()?;
        let mut api = SeurApi::new(config.get_seur_credentials()?, config.get_seur_account()?)
            .test_mode(is_test)
            .with_options(config.get_seur_options()?);

        if let Some(ws) = config.get_seur_ws_credentials()? {
            api.set_ws_login(ws.username, ws.password);
        }

        info!(is_test = is_test, "SEUR client configured");
        Ok(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_with(yaml: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), yaml).unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let (_dir, config) = config_with("{}");

        assert!(config.get_seur_credentials().is_err());
        assert_eq!(config.get_seur_ws_credentials().unwrap(), None);
        assert_eq!(config.get_seur_options().unwrap(), Options::default());
        assert_eq!(config.get_seur_account().unwrap(), Account::default());
    }

    #[test]
    fn test_reads_section() {
        let (_dir, config) = config_with(
            r#"
seur:
  test: true
  account:
    vat: B12345678
    franchise: "08"
    seurid: 77
    ci: 9999
    ccc: 4444
  credentials:
    username: cit_user
    password: cit_pass
  ws_credentials:
    username: ws_user
    password: ws_pass
  options:
    pdf: true
"#,
        );

        let credentials = config.get_seur_credentials().unwrap();
        assert_eq!(credentials.username, "cit_user");
        assert_eq!(credentials.password, "cit_pass");

        let account = config.get_seur_account().unwrap();
        assert_eq!(account.franchise, "08");
        assert_eq!(account.seurid, "77");
        assert_eq!(account.ccc, "4444");

        let options = config.get_seur_options().unwrap();
        assert!(options.pdf);
        assert_eq!(options.printer, "ZEBRA");

        let api = SeurApi::from_config(&config).unwrap();
        assert!(api.is_test());
        assert!(api.options().pdf);
        assert_eq!(api.ws_credentials().unwrap().username, "ws_user");
    }
}
