use url::Url;

const SHEETS_HOST: &str = "docs.google.com";

/// Rewrites a Google Sheets share link into its CSV export URL
///
/// Accepts links of the form `https://docs.google.com/spreadsheets/d/<id>/...`.
/// The tab is taken from a `gid` in the query string, falling back to the
/// fragment (`#gid=N`); without one the export covers the first tab.
///
/// # Returns
///
/// * `Some(Url)` - The `.../export?format=csv[&gid=N]` URL
/// * `None` - The URL is not a Google Sheets document link
pub fn sheet_export_url(url: &Url) -> Option<Url> {
    if url.host_str() != Some(SHEETS_HOST) {
        return None;
    }

    let mut segments = url.path_segments()?;
    if segments.next()? != "spreadsheets" || segments.next()? != "d" {
        return None;
    }
    let id = segments.next().filter(|s| !s.is_empty())?;

    let gid = url
        .query_pairs()
        .find(|(key, _)| key == "gid")
        .map(|(_, value)| value.into_owned())
        .or_else(|| {
            url.fragment().and_then(|fragment| {
                fragment
                    .split('&')
                    .find_map(|part| part.strip_prefix("gid="))
                    .map(str::to_string)
            })
        })
        .filter(|gid| !gid.is_empty());

    let mut export =
        Url::parse(&format!("https://{}/spreadsheets/d/{}/export", SHEETS_HOST, id)).ok()?;
    {
        let mut query = export.query_pairs_mut();
        query.append_pair("format", "csv");
        if let Some(gid) = gid {
            query.append_pair("gid", &gid);
        }
    }
    Some(export)
}
