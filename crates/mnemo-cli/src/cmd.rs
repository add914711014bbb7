//! One function per subcommand. Each returns the text to print.

use crate::error::CliResult;
use crate::render;
use mnemo_memory::MemoryService;
use mnemo_types::memory::{parse_index, Selector};

pub fn cmd_remember(service: &MemoryService, subject: &str, words: &[String]) -> CliResult<String> {
    let text = words.join(" ");
    let entry = service.remember(subject, &text)?;
    Ok(format!("Remembered {}.", entry.subject))
}

pub fn cmd_lookup(
    service: &MemoryService,
    subject: &str,
    index: Option<&str>,
    all: bool,
    json: bool,
) -> CliResult<String> {
    if all {
        let entries = service.history(subject)?;
        if json {
            return Ok(serde_json::to_string_pretty(&entries)?);
        }
        return Ok(entries
            .iter()
            .map(render::entry)
            .collect::<Vec<_>>()
            .join("\n"));
    }

    let index = index.map(parse_index).transpose()?;
    let entry = service.lookup(subject, index)?;
    if json {
        return Ok(serde_json::to_string_pretty(&entry)?);
    }
    Ok(render::entry(&entry))
}

pub fn cmd_remembered(service: &MemoryService, json: bool) -> CliResult<String> {
    let subjects = service.remembered()?;
    if json {
        return Ok(serde_json::to_string_pretty(&subjects)?);
    }
    Ok(render::subjects(&subjects))
}

pub fn cmd_forget(service: &MemoryService, subject: &str, selector: Option<&str>) -> CliResult<String> {
    let selector = Selector::parse(selector)?;
    let removed = service.forget(subject, selector)?;
    Ok(render::forgot(subject, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use mnemo_memory::RecordStore;
    use mnemo_types::error::MnemoError;

    fn setup() -> MemoryService {
        MemoryService::new(RecordStore::open_in_memory(None).unwrap())
    }

    fn words(text: &str) -> Vec<String> {
        text.split(' ').map(String::from).collect()
    }

    #[test]
    fn test_remember_then_lookup() {
        let service = setup();
        cmd_remember(&service, "thing1", &words("Thing1 is the first thing")).unwrap();
        cmd_remember(&service, "thing1", &words("Thing1 is the best thing")).unwrap();

        let out = cmd_lookup(&service, "thing1", None, false, false).unwrap();
        assert!(out.starts_with("Thing1 is the best thing ("));
        let out = cmd_lookup(&service, "thing1", Some("2"), false, false).unwrap();
        assert!(out.starts_with("Thing1 is the first thing ("));
    }

    #[test]
    fn test_lookup_all_lists_newest_first() {
        let service = setup();
        cmd_remember(&service, "s", &words("A")).unwrap();
        cmd_remember(&service, "s", &words("B")).unwrap();
        let out = cmd_lookup(&service, "s", None, true, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("B ("));
        assert!(lines[1].starts_with("A ("));
    }

    #[test]
    fn test_lookup_non_numeric_index() {
        let service = setup();
        cmd_remember(&service, "s", &words("A")).unwrap();
        let err = cmd_lookup(&service, "s", Some("two"), false, false).unwrap_err();
        assert!(matches!(err, CliError::Mnemo(MnemoError::InvalidSelector(_))));
    }

    #[test]
    fn test_lookup_json() {
        let service = setup();
        cmd_remember(&service, "s", &words("hello world")).unwrap();
        let out = cmd_lookup(&service, "s", None, false, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["text"], "hello world");
        assert_eq!(value["subject"], "s");
    }

    #[test]
    fn test_remembered_output() {
        let service = setup();
        assert_eq!(cmd_remembered(&service, false).unwrap(), "Nothing remembered.");
        cmd_remember(&service, "thing1", &words("A")).unwrap();
        cmd_remember(&service, "thing2", &words("B")).unwrap();
        cmd_remember(&service, "thing1", &words("C")).unwrap();
        assert_eq!(cmd_remembered(&service, false).unwrap(), "thing1:2, thing2:1");

        let json: serde_json::Value =
            serde_json::from_str(&cmd_remembered(&service, true).unwrap()).unwrap();
        assert_eq!(json[0]["subject"], "thing1");
        assert_eq!(json[0]["count"], 2);
    }

    #[test]
    fn test_forget_selectors() {
        let service = setup();
        for text in ["A", "B", "C"] {
            cmd_remember(&service, "s", &words(text)).unwrap();
        }
        assert_eq!(
            cmd_forget(&service, "s", None).unwrap(),
            "Forgot 1 memory about s."
        );
        assert_eq!(
            cmd_forget(&service, "s", Some("all")).unwrap(),
            "Forgot 2 memories about s."
        );
        let err = cmd_forget(&service, "s", None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = cmd_forget(&service, "s", Some("everything")).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }
}
