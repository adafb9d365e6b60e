#![allow(dead_code)]

/// One heatmap tile as the site renders it.
pub fn tile(ticker: &str, pct: &str) -> String {
    format!(
        r#"<a class="none-link fin-size-medium svelte-wdkn18" href="/quote/{t}/" title="{t}">
             <div class="ticker-div svelte-wdkn18">{t}</div>
             <div class="percent-div svelte-wdkn18">{p}</div>
           </a>"#,
        t = ticker,
        p = pct
    )
}

/// A sector page whose heatmap holds the given tiles, in the given order.
pub fn heatmap_page(tiles: &[(&str, &str)]) -> String {
    let inner: String = tiles.iter().map(|(t, p)| tile(t, p)).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>Sector</title></head><body>
           <section><div class="heatMap-container svelte-1k2">{}</div></section>
           </body></html>"#,
        inner
    )
}

pub fn page_without_container() -> String {
    "<html><body><div class=\"sector-overview\">nothing here</div></body></html>".to_string()
}

pub fn page_with_empty_heatmap() -> String {
    heatmap_page(&[])
}
