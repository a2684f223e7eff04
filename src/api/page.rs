//! Server-rendered single page: the input form plus the outcome of the last
//! trigger.

use std::fmt::Write;

use crate::error::AppError;
use crate::pipeline::Summary;

const TITLE: &str = "Summarize Text from Youtube Videos or Websites";
pub const SUCCESS_MESSAGE: &str = "Summary generated successfully!";

/// What the page shows below the form.
pub enum Outcome<'a> {
    Empty,
    Success(&'a Summary),
    Failure(&'a AppError),
}

impl<'a> From<&'a crate::error::Result<Summary>> for Outcome<'a> {
    fn from(result: &'a crate::error::Result<Summary>) -> Self {
        match result {
            Ok(summary) => Outcome::Success(summary),
            Err(err) => Outcome::Failure(err),
        }
    }
}

/// Renders the page. The API key is never written back into the form.
pub fn render(url_value: &str, outcome: Outcome<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", TITLE);
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{}</h1>\n<h2>Summarize URL</h2>", TITLE);

    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str(
        "<label for=\"api_key\">Enter Groq API Key</label>\n\
         <input type=\"password\" id=\"api_key\" name=\"api_key\" autocomplete=\"off\">\n",
    );
    let _ = writeln!(
        html,
        "<label for=\"url\">Enter URL</label>\n<input type=\"text\" id=\"url\" name=\"url\" value=\"{}\">",
        html_escape(url_value)
    );
    html.push_str("<button type=\"submit\">Summarize the Content from YT or Website</button>\n</form>\n");

    match outcome {
        Outcome::Empty => {}
        Outcome::Success(summary) => {
            let _ = writeln!(html, "<div class=\"success\">&#9989; {}</div>", SUCCESS_MESSAGE);
            let _ = writeln!(
                html,
                "<label for=\"summary\">Summary</label>\n<textarea id=\"summary\" readonly>{}</textarea>",
                html_escape(&summary.summary)
            );
        }
        Outcome::Failure(err) => {
            let _ = writeln!(
                html,
                "<div class=\"error\">&#9888;&#65039; {}</div>",
                err.user_message()
            );
            if let Some(detail) = err.detail() {
                let _ = writeln!(html, "<pre class=\"detail\">{}</pre>", html_escape(&detail));
            }
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

const STYLE: &str = "<style>
body { font-family: sans-serif; margin: 0; background: #fafafa; }
main { max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
input { width: 100%; padding: .5rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: .5rem 1rem; }
.success { margin-top: 1.5rem; padding: .75rem; background: #e6f4ea; color: #1e4620; }
.error { margin-top: 1.5rem; padding: .75rem; background: #fdecea; color: #611a15; }
.detail { padding: .75rem; background: #fff; border: 1px solid #eee; white-space: pre-wrap; }
textarea { width: 100%; height: 300px; box-sizing: border-box; }
</style>
";

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::SourceLabel;
    use chrono::Utc;

    fn summary(text: &str) -> Summary {
        Summary {
            url: "https://example.com/article".to_string(),
            source: SourceLabel::Website,
            summary: text.to_string(),
            word_count: 2,
            summarized_at: Utc::now(),
        }
    }

    #[test]
    fn empty_page_has_form_only() {
        let html = render("", Outcome::Empty);
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("Summarize the Content from YT or Website"));
        assert!(!html.contains("<textarea"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn success_shows_indicator_and_escaped_summary() {
        let html = render("https://example.com/article", Outcome::Success(&summary("<b>Key</b> points")));
        assert!(html.contains(SUCCESS_MESSAGE));
        assert!(html.contains("&lt;b&gt;Key&lt;/b&gt; points</textarea>"));
        assert!(html.contains("value=\"https://example.com/article\""));
    }

    #[test]
    fn failure_shows_message_and_detail_without_summary() {
        let err = AppError::Fetch("captions disabled".to_string());
        let html = render("https://youtu.be/ID456", Outcome::Failure(&err));
        assert!(html.contains("An error occurred during summarization."));
        assert!(html.contains("Failed to fetch content: captions disabled"));
        assert!(!html.contains("<textarea"));
        assert!(!html.contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn validation_failure_has_targeted_message() {
        let html = render("", Outcome::Failure(&AppError::MissingInput));
        assert!(html.contains("Please fill the credentials and URL."));
        assert!(!html.contains("class=\"detail\""));
    }

    #[test]
    fn url_value_is_escaped() {
        let html = render("\"><script>x</script>", Outcome::Empty);
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
