//! `codesmith prompt` commands.

use crate::cli::PromptCommand;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::read_source;

/// Execute a `prompt` subcommand.
///
/// # Errors
///
/// Returns an error string if the template cannot be saved, listed or found.
pub fn run(ctx: &ServiceContext, command: &PromptCommand) -> Result<String, String> {
    let library = Pipeline::new(ctx).prompts();
    match command {
        PromptCommand::Save { name, file } => {
            let content = read_source(file.as_deref())?;
            let file = library.save(name, &content).map_err(|e| e.to_string())?;
            Ok(format!("Saved prompt template {file}"))
        }
        PromptCommand::List => {
            let names = library.list().map_err(|e| e.to_string())?;
            if names.is_empty() {
                Ok("No prompt templates saved.".to_string())
            } else {
                Ok(names.join("\n"))
            }
        }
        PromptCommand::Show { name } => library
            .load(name)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Prompt template not found: {name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_empty_library() {
        let ctx = ServiceContext::in_memory();
        assert_eq!(run(&ctx, &PromptCommand::List).unwrap(), "No prompt templates saved.");
    }

    #[test]
    fn save_from_file_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.txt");
        std::fs::write(&path, "Review this code:\n").unwrap();
        let ctx = ServiceContext::in_memory();

        let saved = run(&ctx, &PromptCommand::Save { name: "code review".into(), file: Some(path) }).unwrap();
        assert_eq!(saved, "Saved prompt template code_review.txt");

        let shown = run(&ctx, &PromptCommand::Show { name: "code_review".into() }).unwrap();
        assert_eq!(shown, "Review this code:\n");
        assert_eq!(run(&ctx, &PromptCommand::List).unwrap(), "code_review");
    }

    #[test]
    fn show_missing_template_fails() {
        let ctx = ServiceContext::in_memory();
        let err = run(&ctx, &PromptCommand::Show { name: "ghost".into() }).unwrap_err();
        assert_eq!(err, "Prompt template not found: ghost");
    }
}
