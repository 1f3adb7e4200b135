use std::path::Path;

use anyhow::{bail, Context, Result};

/// Refuse to write CSV over one of the files being validated.
///
/// Inputs have already been read, so they exist; an output that does not
/// exist yet cannot be one of them. Existing paths are compared canonicalized,
/// which also resolves `..` and symlinks.
pub fn ensure_not_an_input(output: &Path, inputs: &[&Path]) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    let target = output
        .canonicalize()
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs {
        let source = input
            .canonicalize()
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if source == target {
            bail!(
                "refusing to overwrite input file {} with CSV output",
                input.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::ensure_not_an_input;

    #[test]
    fn dotted_spelling_of_an_input_is_refused() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("ep.txt");
        fs::write(&input, "303 eth1/5 vlan-713\n").expect("write");
        fs::create_dir(dir.path().join("out")).expect("mkdir");
        let output = dir.path().join("out").join("..").join("ep.txt");

        let err = ensure_not_an_input(&output, &[input.as_path()]).expect_err("should refuse");
        assert!(err.to_string().contains("refusing to overwrite"));
    }

    #[test]
    fn new_or_distinct_outputs_are_allowed() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("ep.txt");
        fs::write(&input, "303 eth1/5 vlan-713\n").expect("write");
        let existing = dir.path().join("old.csv");
        fs::write(&existing, "VLAN,EPG,PATH\n").expect("write");

        assert!(ensure_not_an_input(&dir.path().join("new.csv"), &[input.as_path()]).is_ok());
        assert!(ensure_not_an_input(&existing, &[input.as_path()]).is_ok());
    }
}
