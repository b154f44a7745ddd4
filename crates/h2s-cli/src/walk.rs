//! Source discovery for bulk conversion.
//!
//! Walks with the `ignore` crate in raw mode: gitignore rules and hidden-file
//! filtering are off, so every document under the folder is converted.

use std::path::{Path, PathBuf};

use h2s_parser::has_extension;
use ignore::WalkBuilder;

/// Every file under `root` whose extension matches `extension`, sorted by path.
pub fn find_documents(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.sort_by_file_path(|a, b| a.cmp(b));

    builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%error, "walk: skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| path.to_str().is_some_and(|p| has_extension(p, extension)))
        .collect()
}

/// Output directory for `document`, mirroring its position under `root`.
pub fn mirrored_dir(root: &Path, document: &Path, out_dir: &Path) -> PathBuf {
    document
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map_or_else(|| out_dir.to_path_buf(), |relative| out_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finds_nested_documents_including_hidden_and_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("blog/posts")).expect("dirs");
        fs::create_dir_all(root.join(".drafts")).expect("dirs");
        fs::write(root.join(".gitignore"), "blog/\n").expect("gitignore");
        fs::write(root.join("index.html"), "<p>home</p>").expect("write");
        fs::write(root.join("blog/posts/first.HTML"), "<p>1</p>").expect("write");
        fs::write(root.join(".drafts/wip.html"), "<p>wip</p>").expect("write");
        fs::write(root.join("style.css"), "p {}").expect("write");

        let found: Vec<_> = find_documents(root, "html")
            .into_iter()
            .map(|p| p.strip_prefix(root).expect("under root").to_path_buf())
            .collect();

        assert_eq!(
            found,
            vec![
                PathBuf::from(".drafts/wip.html"),
                PathBuf::from("blog/posts/first.HTML"),
                PathBuf::from("index.html"),
            ]
        );
    }

    #[test]
    fn mirrored_dir_keeps_relative_layout() {
        let root = Path::new("/site");
        let out = Path::new("/build");
        assert_eq!(
            mirrored_dir(root, Path::new("/site/blog/posts/first.html"), out),
            PathBuf::from("/build/blog/posts")
        );
        assert_eq!(
            mirrored_dir(root, Path::new("/site/index.html"), out),
            PathBuf::from("/build")
        );
    }
}
