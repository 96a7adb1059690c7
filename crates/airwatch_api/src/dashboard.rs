use crate::app_state::AppState;
use crate::config::MapSettings;
use axum::{extract::State, response::Html};

const REFRESH_INTERVAL_MS: u32 = 60_000;

/// Render the map page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_dashboard(&state.map, state.using_real_data))
}

pub fn render_dashboard(map: &MapSettings, using_real_data: bool) -> String {
    let badge = if using_real_data {
        r#"<span class="badge live">Live data</span>"#
    } else {
        r#"<span class="badge simulated">Simulated data</span>"#
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Air Quality Dashboard</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <style>
    body {{ margin: 0; font-family: sans-serif; }}
    header {{ padding: 0.5rem 1rem; display: flex; gap: 1rem; align-items: center; }}
    #map {{ height: calc(100vh - 3rem); }}
    .badge {{ padding: 0.2rem 0.6rem; border-radius: 0.8rem; font-size: 0.8rem; }}
    .live {{ background: #00e400; }}
    .simulated {{ background: #ffff00; }}
    .aqi-dot {{ border: 2px solid #333; border-radius: 50%; width: 20px; height: 20px; }}
  </style>
</head>
<body>
  <header><h1>Air Quality Dashboard</h1>{badge}</header>
  <div id="map"></div>
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script>
    const CONFIG = {{ centerLat: {lat}, centerLon: {lon}, zoom: {zoom} }};
    const markers = L.layerGroup();
    const map = L.map('map').setView([CONFIG.centerLat, CONFIG.centerLon], CONFIG.zoom);
    L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }}).addTo(map);
    markers.addTo(map);

    function draw(stations) {{
      markers.clearLayers();
      for (const station of stations) {{
        const icon = L.divIcon({{
          className: 'aqi-marker',
          html: `<div class="aqi-dot" style="background-color: ${{station.color}}"></div>`,
          iconSize: [20, 20],
          iconAnchor: [10, 10]
        }});
        L.marker([station.lat, station.lon], {{ icon }})
          .bindPopup(`<strong>Station:</strong> ${{station.name}}<br>` +
                     `<strong>AQI:</strong> <span style="color: ${{station.color}}; font-weight: bold;">${{station.aqi}}</span><br>` +
                     `<strong>Level:</strong> ${{station.level}}`)
          .addTo(markers);
      }}
    }}

    async function refresh() {{
      try {{
        const response = await fetch('/api/air_quality');
        const data = await response.json();
        if (data.success && data.stations) {{
          draw(data.stations);
        }} else {{
          console.error('API failed to return station data:', data.message);
        }}
      }} catch (error) {{
        console.error('Error connecting to the backend API:', error);
      }}
    }}

    refresh();
    setInterval(refresh, {refresh});
  </script>
</body>
</html>
"##,
        badge = badge,
        lat = map.center_lat,
        lon = map.center_lon,
        zoom = map.zoom,
        refresh = REFRESH_INTERVAL_MS,
    )
}
