/// HTML templates for the status pages
///
/// The web surface is read-only: a landing page that polls the status API.
/// Management actions stay in the Telegram admin commands.

/// Landing page served at `/`
pub fn status_page(version: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Redeem Bot</title>
<style>
  body {{
    background: #111827;
    color: #e5e7eb;
    font-family: system-ui, -apple-system, sans-serif;
    display: flex;
    justify-content: center;
    padding-top: 4rem;
  }}
  .card {{
    background: #1f2937;
    border-radius: 0.75rem;
    padding: 2rem 3rem;
    min-width: 22rem;
  }}
  h1 {{ font-size: 1.25rem; margin: 0 0 0.25rem; }}
  .version {{ color: #9ca3af; font-size: 0.8rem; margin-bottom: 1.5rem; }}
  dl {{ display: grid; grid-template-columns: auto auto; gap: 0.5rem 2rem; }}
  dt {{ color: #9ca3af; }}
  dd {{ margin: 0; text-align: right; font-variant-numeric: tabular-nums; }}
</style>
</head>
<body>
  <div class="card">
    <h1>🎁 Redeem Bot</h1>
    <div class="version">v{version}</div>
    <dl>
      <dt>Status</dt><dd id="status">loading…</dd>
      <dt>Uptime</dt><dd id="uptime">—</dd>
      <dt>Active codes</dt><dd id="codes">—</dd>
      <dt>Users served</dt><dd id="users">—</dd>
    </dl>
  </div>
<script>
async function refresh() {{
  try {{
    const res = await fetch('/status');
    const body = await res.json();
    if (!body.success) return;
    const d = body.data;
    document.getElementById('status').textContent = 'online';
    document.getElementById('uptime').textContent = d.uptime_seconds + 's';
    document.getElementById('codes').textContent = d.codes_count;
    document.getElementById('users').textContent = d.active_users;
  }} catch (e) {{
    document.getElementById('status').textContent = 'offline';
  }}
}}
refresh();
setInterval(refresh, 5000);
</script>
</body>
</html>"#,
        version = version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_page_embeds_version() {
        let html = status_page("1.2.3");
        assert!(html.contains("v1.2.3"));
        assert!(html.contains("fetch('/status')"));
    }
}
