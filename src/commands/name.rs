use crate::app::Event;
use crate::args::NameArgs;
use crate::commands::{open, Out};
use crate::{Config, Result};

/// Sets the display name that is saved with the expenses.
pub fn name(config: Config, args: NameArgs) -> Result<Out<()>> {
    let mut app = open(&config)?;
    let name = args.name().trim().to_string();
    app.dispatch(Event::Rename(name.clone()))?;
    let message = if name.is_empty() {
        "Cleared the display name".to_string()
    } else {
        format!("Display name set to '{name}'")
    };
    Ok(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_name() {
        let env = TestEnv::new();
        let food = env.add("Groceries", "100", "Food", "2024-01-05");

        let out = name(env.config(), NameArgs::new(" Ayesha ")).unwrap();
        assert_eq!(out.message(), "Display name set to 'Ayesha'");
        let saved = env.saved();
        assert_eq!(saved.username, "Ayesha");
        assert_eq!(saved.expenses, vec![food]);

        let out = name(env.config(), NameArgs::new("")).unwrap();
        assert_eq!(out.message(), "Cleared the display name");
        assert_eq!(env.saved().username, "");
    }

    #[test]
    fn test_name_survives_later_changes() {
        let env = TestEnv::new();
        name(env.config(), NameArgs::new("Bilal")).unwrap();
        env.add("Groceries", "100", "Food", "2024-01-05");
        assert_eq!(env.saved().username, "Bilal");
    }
}
