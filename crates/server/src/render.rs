//! Embedded single-page dashboard
//!
//! The page posts the form to the design API and renders the returned record
//! as a hero flowability card plus mass-flow and funnel-flow metric cards.
//! The layout mirrors the printed specification sheet the CSV export uses.

pub const DASHBOARD_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Hopper Design Suite</title>
<style>
  body { font-family: 'Inter', sans-serif; background-color: #f8fafc; color: #0f172a; margin: 0; }
  .layout { display: flex; min-height: 100vh; }
  .sidebar { width: 280px; background-color: #0f172a; color: #ffffff; padding: 24px; }
  .sidebar h1 { font-size: 1.2rem; }
  .sidebar label { display: block; margin-top: 16px; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }
  .sidebar input, .sidebar select { width: 100%; margin-top: 4px; padding: 8px; border-radius: 6px; border: none; box-sizing: border-box; }
  .sidebar button { width: 100%; margin-top: 24px; background-color: #3b82f6; color: white; font-weight: 700; border-radius: 8px; border: none; padding: 10px; cursor: pointer; }
  .main { flex: 1; padding: 32px; }
  .flow-hero { background: linear-gradient(135deg, #1e293b 0%, #0f172a 100%); color: white; padding: 30px; border-radius: 15px; text-align: center; margin-bottom: 30px; }
  .flow-hero h2 { color: #3b82f6; margin: 0; font-size: 2.5rem; }
  .columns { display: flex; gap: 24px; }
  .column { flex: 1; }
  .metric-container { background-color: #ffffff; border-radius: 12px; padding: 25px; border: 1px solid #e2e8f0; margin-bottom: 20px; }
  .metric-label { color: #64748b; font-size: 0.875rem; font-weight: 600; text-transform: uppercase; letter-spacing: 0.05em; }
  .metric-value { color: #0f172a; font-size: 2.25rem; font-weight: 800; margin-top: 5px; }
  .banner { padding: 12px 16px; border-radius: 8px; margin-bottom: 20px; display: none; }
  .banner.error { background-color: #fee2e2; color: #991b1b; display: block; }
  .banner.warning { background-color: #fef9c3; color: #854d0e; display: block; }
  #download { display: none; margin-top: 10px; }
</style>
</head>
<body>
<div class="layout">
  <aside class="sidebar">
    <h1>Hopper Design Suite</h1>
    <label for="bulk">Bulk Density (kg/m&#179;)</label>
    <input id="bulk" type="number" min="200" max="3000" value="850" step="0.1">
    <label for="tapped">Tapped Density (kg/m&#179;)</label>
    <input id="tapped" type="number" min="200" max="6000" value="1020" step="0.1">
    <label for="d50">Particle Size d50 (&#181;m)</label>
    <input id="d50" type="number" min="1" max="5000" value="75" step="0.1">
    <label for="shape">Particle Shape</label>
    <select id="shape">
      <option>Spherical</option>
      <option>Angular</option>
      <option>Irregular</option>
      <option>Elongated</option>
    </select>
    <button id="calculate">Calculate Design</button>
    <button id="download">Download Report (CSV)</button>
  </aside>
  <main class="main">
    <h1>Industrial Hopper Design Suite</h1>
    <p>Predictive modeling for mass and funnel flow characteristics.</p>
    <div id="banner" class="banner"></div>
    <div id="results" style="display:none">
      <div class="flow-hero">
        <p>Primary Prediction</p>
        <h2 id="flowability"></h2>
        <p>Calculated material flowability characterization</p>
      </div>
      <div class="columns">
        <div class="column">
          <h3>Mass Flow (Conical)</h3>
          <div class="metric-container">
            <div class="metric-label">Recommended Half Angle</div>
            <div class="metric-value" id="mf-half-angle"></div>
          </div>
          <div class="metric-container">
            <div class="metric-label">Outlet Dimension (NB)</div>
            <div class="metric-value" id="mf-outlet"></div>
          </div>
        </div>
        <div class="column">
          <h3>Funnel Flow (Plane)</h3>
          <div class="metric-container">
            <div class="metric-label">Recommended Half Angle</div>
            <div class="metric-value" id="ff-half-angle"></div>
          </div>
          <div class="metric-container">
            <div class="metric-label">Valley Angle (External)</div>
            <div class="metric-value" id="ff-valley-angle"></div>
          </div>
          <div class="metric-container">
            <div class="metric-label">Outlet Dimension (NB)</div>
            <div class="metric-value" id="ff-outlet"></div>
          </div>
        </div>
      </div>
    </div>
  </main>
</div>
<script>
function requestBody() {
  return JSON.stringify({
    bulk_density_kg_m3: parseFloat(document.getElementById('bulk').value),
    tapped_density_kg_m3: parseFloat(document.getElementById('tapped').value),
    d50_um: parseFloat(document.getElementById('d50').value),
    shape: document.getElementById('shape').value,
  });
}

function showBanner(kind, text) {
  const banner = document.getElementById('banner');
  banner.className = 'banner ' + kind;
  banner.textContent = text;
}

function clearBanner() {
  document.getElementById('banner').className = 'banner';
}

document.getElementById('calculate').addEventListener('click', async () => {
  clearBanner();
  const response = await fetch('/api/v1/design', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: requestBody(),
  });
  const body = await response.json();
  if (!response.ok) {
    document.getElementById('results').style.display = 'none';
    showBanner('error', body.error || 'Design computation failed');
    return;
  }
  const record = body.record;
  document.getElementById('flowability').textContent = record.flowability;
  document.getElementById('mf-half-angle').textContent = record.mass_flow_half_angle_deg.toFixed(1) + '°';
  document.getElementById('mf-outlet').textContent = Math.trunc(record.mass_flow_outlet_nb);
  document.getElementById('ff-half-angle').textContent = record.funnel_flow_half_angle_deg.toFixed(1) + '°';
  document.getElementById('ff-valley-angle').textContent = record.funnel_flow_valley_angle_deg.toFixed(1) + '°';
  document.getElementById('ff-outlet').textContent = Math.trunc(record.funnel_flow_outlet_nb);
  document.getElementById('results').style.display = 'block';
  document.getElementById('download').style.display = 'block';
  if (!body.audit.success) {
    showBanner('warning', 'Audit logging unavailable: ' + body.audit.message);
  }
});

document.getElementById('download').addEventListener('click', async () => {
  const response = await fetch('/api/v1/design/report', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: requestBody(),
  });
  if (!response.ok) {
    showBanner('error', 'Report export failed');
    return;
  }
  const disposition = response.headers.get('Content-Disposition') || '';
  const match = disposition.match(/filename="(.+)"/);
  const blob = await response.blob();
  const link = document.createElement('a');
  link.href = URL.createObjectURL(blob);
  link.download = match ? match[1] : 'hopper_design.csv';
  link.click();
  URL.revokeObjectURL(link.href);
});
</script>
</body>
</html>
"#;
