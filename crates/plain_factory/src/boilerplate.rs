/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Fixed prose that surrounds every license.

/// Changelog shown when a license has none.
pub const DEFAULT_CHANGELOG: &str = "\n## such empty, much void :nounproject-doge:";

/// The "we are not lawyers" disclaimer.
pub fn not_advice_text(issues_link: &str, edit_link: &str) -> String {
    format!(
        "We are not lawyers. This is not legal advice. If you need legal advice, talk to a lawyer. \
You use this license at your own risk.\n\n\
We are normal people making licenses accessible for everyone. We hope our plain language helps \
you and anyone else understand this license  (including lawyers). If you see a mistake or want \
to suggest a change, please [submit an issue on GitHub]({issues_link} \"Submit an issue on GitHub\") \
or [edit this page]({edit_link} \"edit on GitHub\").\n"
    )
}

/// The "not the official license" disclaimer.
pub fn not_official_text(
    plain_name: &str,
    original_name: &str,
    original_organization: &str,
    original_url: &str,
) -> String {
    format!(
        "Plain License is not affiliated with the original {original_name} authors or \
{original_organization}. **Our plain language versions are not official** and are not endorsed \
by the original authors. Our licenses may also include different terms or additional \
information. We try to capture the *legal meaning* of the original license, but we can't \
guarantee our license provides the same legal protections.\n\n\
If you want to use the {plain_name}, start by reading the official {original_name} license \
text. You can find the official {original_name} [here]({original_url} \"check out the official \
{original_name}\"). If you have questions about the {original_name}, you should talk to a \
lawyer.\n"
    )
}

/// The "Embedding Your License" section with its iframe code block.
pub fn embed_link(embed_url: &str, title: &str, page_url: &str) -> String {
    format!(
        r#"# Embedding Your License

```html

<iframe src="{embed_url}"
style="position: absolute; top: 0; left: 0; width: 100%; height: 100%;
border: 1px solid #E4C580; border-radius: 8px; overflow: hidden auto;"
title="{title}" loading="lazy" sandbox="allow-scripts"
onload="if(this.contentDocument.body.scrollHeight > 400)
this.style.height = this.contentDocument.body.scrollHeight + 'px';"
referrerpolicy="no-referrer-when-downgrade">
    <p>Your browser does not support iframes. View {title} at:
        <a href="{page_url}">
            plainlicense.org
        </a>
    </p>
</iframe>

```"#
    )
}

/// Step-by-step instructions that follow the embed code.
pub fn embed_instructions(embed_url: &str, site_url: &str) -> String {
    format!(
        r#"

The above code will embed the license in your site. It uses an iframe to display the license as it appears on Plain License. This also sandboxes the license to prevent it from affecting your site.

1. **Copy the code above** using the copy button
2. **Paste it** into your HTML where you want the license to appear
3. **Adjust the size** (optional):

   - The default width is 100% (fills the container)
   - The default height is either the content height or 1024px, whichever is smaller.
   - The next section provides more details on customizing the size.

## Customizing Your Embedded License

### Changing the Size

Common size adjustments in the `style` attribute:

```html

<!-- Full width, taller -->
style="width: 100%; height: 800px;"

<!-- Fixed width, default height -->
style="width: 800px; height: 500px;"

<!-- Full width, minimum height -->
style="width: 100%; min-height: 500px;"

```

## Color Scheme Preference

The embedded license will match your visitors' system preferences for light or dark mode by default.

### Forcing a Specific Theme

To force a specific theme, add `?theme=` to the URL, along with `light` or `dark`:

- For light theme: `src="{embed_url}?theme=light"`
- For dark theme: `src="{embed_url}?theme=dark"`

### Syncing the License Theme with Your Site (more advanced)

You can optionally sync the license's light/dark theme to your site's theme. You will need to send the embedded license page a message to tell it what theme your site is currently using. You can include this code in your script bundle or HTML:

```javascript

const syncTheme = () => {{
const iframe = document.getElementById("license-embed");
const theme = document.documentElement.classList.contains("dark") ? "dark" : "light";
iframe.contentWindow.postMessage({{ theme }}, "{site_url}");
}};

```

If your site has a toggle switch for changing themes, you can link it to the embedded license. Set up the toggle to send a `themeChange` event and add a listener to dispatch the same message. We can't provide specific code for that because it depends on your setup.

Once your toggle switch is set up to send a `themeChange` event, you need to add a listener to dispatch the same message as before:

```javascript

const syncTheme = () => {{
const iframe = document.getElementById("license-embed");
const theme = document.documentElement.classList.contains("dark") ? "dark" : "light";
iframe.contentWindow.postMessage({{ theme }}, "{site_url}");
}};
document.addEventListener('themeChange', syncTheme);

```

## Need Help?

Bring your questions to our [GitHub Discussions](https://github.com/plainlicense/plainlicense/discussions "visit Plain License's discussions page") for help and support.
"#
    )
}

/// The bare `<iframe>…</iframe>` element out of an embed section.
pub fn extract_iframe(embed: &str) -> Option<&str> {
    const CLOSE: &str = "</iframe>";
    let start = embed.find("<iframe")?;
    let end = embed.rfind(CLOSE)? + CLOSE.len();
    (start < end).then(|| &embed[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_link_wraps_iframe() {
        let link = embed_link(
            "https://plainlicense.org/embed/mit.html",
            "The MIT License",
            "https://plainlicense.org/licenses/permissive/mit.html",
        );
        assert!(link.starts_with("# Embedding Your License\n\n```html"));
        let iframe = extract_iframe(&link).unwrap();
        assert!(iframe.starts_with("<iframe src=\"https://plainlicense.org/embed/mit.html\""));
        assert!(iframe.ends_with("</iframe>"));
        assert!(iframe.contains("View The MIT License at:"));
    }

    #[test]
    fn test_extract_iframe_without_element() {
        assert_eq!(extract_iframe("no frames here"), None);
    }

    #[test]
    fn test_instructions_use_embed_url_and_site() {
        let text = embed_instructions("https://x.org/embed/mit.html", "https://x.org");
        assert!(text.contains("src=\"https://x.org/embed/mit.html?theme=dark\""));
        assert!(text.contains("postMessage({ theme }, \"https://x.org\")"));
        assert!(text.trim_end().ends_with("for help and support."));
    }

    #[test]
    fn test_disclaimers_name_their_parties() {
        let advice = not_advice_text("https://issues", "https://edit");
        assert!(advice.starts_with("We are not lawyers."));
        assert!(advice.contains("[edit this page](https://edit \"edit on GitHub\")"));

        let official = not_official_text("MIT License", "MIT", "OSI", "https://mit");
        assert!(official.contains("original MIT authors or OSI."));
        assert!(official.contains("If you want to use the MIT License,"));
        assert!(official.contains("[here](https://mit \"check out the official MIT\")"));
    }
}
