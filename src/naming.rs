//! Public URL derivation.
//!
//! Manifest URLs are the filesystem path with the `public_root` prefix
//! removed, so a site serving `public/` at `/` can use them as-is:
//!
//! ```text
//! public_root  public
//! path         public/images/001-dawn.jpg
//! url          /images/001-dawn.jpg
//! ```
//!
//! The prefix comparison is by path component, not by string, so
//! `public-assets/x.jpg` is not under `public`. Paths outside `public_root`,
//! including ones that climb back out of it with `..`, are passed through
//! unchanged rather than rejected.

use std::path::{Component, Path};

/// Express `path` as a URL relative to `public_root`.
///
/// Separators are always `/`, regardless of platform.
pub fn public_url(path: &Path, public_root: &Path) -> String {
    let passthrough = || path.to_string_lossy().into_owned();
    let Ok(relative) = path.strip_prefix(public_root) else {
        return passthrough();
    };

    let mut url = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                url.push('/');
                url.push_str(&part.to_string_lossy());
            }
            Component::CurDir => {}
            // `public/../x` is not under the root even though the prefix matched.
            _ => return passthrough(),
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn strips_public_root() {
        let url = public_url(
            Path::new("/srv/site/public/images/a.png"),
            Path::new("/srv/site/public"),
        );
        assert_eq!(url, "/images/a.png");
    }

    #[test]
    fn strips_relative_public_root() {
        let url = public_url(Path::new("public/gallery/b.jpg"), Path::new("public"));
        assert_eq!(url, "/gallery/b.jpg");
    }

    #[test]
    fn trailing_slash_on_root_is_ignored() {
        let url = public_url(Path::new("public/gallery/b.jpg"), Path::new("public/"));
        assert_eq!(url, "/gallery/b.jpg");
    }

    #[test]
    fn nested_output_dir() {
        let path: PathBuf = ["public", "static", "thumbs", "c.jpeg"].iter().collect();
        assert_eq!(public_url(&path, Path::new("public")), "/static/thumbs/c.jpeg");
    }

    #[test]
    fn path_outside_root_passes_through() {
        let url = public_url(Path::new("/elsewhere/a.png"), Path::new("/srv/public"));
        assert_eq!(url, "/elsewhere/a.png");
    }

    #[test]
    fn sibling_with_shared_prefix_is_not_stripped() {
        let url = public_url(Path::new("public-assets/a.png"), Path::new("public"));
        assert_eq!(url, "public-assets/a.png");
    }

    #[test]
    fn parent_dir_after_root_passes_through() {
        let url = public_url(Path::new("public/../thumbs/a.png"), Path::new("public"));
        assert_eq!(url, "public/../thumbs/a.png");
    }

    #[test]
    fn cur_dir_after_root_is_ignored() {
        let url = public_url(Path::new("public/./gallery/a.png"), Path::new("public"));
        assert_eq!(url, "/gallery/a.png");
    }

    #[test]
    fn root_itself_is_slash() {
        assert_eq!(public_url(Path::new("public"), Path::new("public")), "/");
    }
}
