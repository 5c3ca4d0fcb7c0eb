use error_stack::{Context, Report};

/// Turns figment errors into reports. Figment keeps the failing key and
/// the provider it came from in plain fields, so they are spelled out
/// as attachments here.
pub trait FigmentResultExt<T> {
    fn into_report<C: Context>(self, context: C) -> error_stack::Result<T, C>;
}

impl<T> FigmentResultExt<T> for Result<T, figment::Error> {
    fn into_report<C: Context>(self, context: C) -> error_stack::Result<T, C> {
        self.map_err(|error| {
            details(&error)
                .into_iter()
                .fold(Report::new(context), |report, detail| {
                    report.attach_printable(detail)
                })
        })
    }
}

fn details(error: &figment::Error) -> Vec<String> {
    let mut details = vec![error.kind.to_string()];

    if !error.path.is_empty() {
        let key = match (&error.profile, &error.metadata) {
            (Some(profile), Some(metadata)) => metadata.interpolate(profile, &error.path),
            _ => error.path.join("."),
        };
        details.push(format!("for key {key:?}"));
    }

    if let Some(metadata) = &error.metadata {
        details.push(match &metadata.source {
            Some(source) => format!("from {} ({source})", metadata.name),
            None => format!("from {}", metadata.name),
        });
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{
        providers::{Format, Toml},
        Figment, Jail,
    };
    use serde::Deserialize;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("Failed to read settings")]
    struct SettingsError;

    #[derive(Debug, Deserialize)]
    struct Settings {
        #[allow(unused)]
        pretty: bool,
    }

    #[test]
    fn test_plain_message() {
        let error = figment::Error::from(String::from("boom"));
        assert_eq!(vec![String::from("boom")], details(&error));
    }

    #[test]
    fn test_key_and_source() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.toml", r#"pretty = "sure""#)?;

            let result = Figment::new()
                .merge(Toml::file("settings.toml"))
                .extract::<Settings>();

            let details = details(result.as_ref().unwrap_err());
            assert!(details.iter().any(|d| d.starts_with("for key") && d.contains("pretty")));
            assert!(details.iter().any(|d| d.contains("TOML") && d.contains("settings.toml")));

            let report = result.into_report(SettingsError).unwrap_err();
            let rendered = format!("{report:?}");
            assert!(rendered.contains("Failed to read settings"));
            assert!(rendered.contains("settings.toml"));
            Ok(())
        });
    }
}
