//! Provider response bodies, trimmed from real responses.

/// OSRM `/route/v1/driving` Wynn -> MGM Grand with GeoJSON geometry.
/// First and last points are snapped road positions, not the request points.
pub const OSRM_GEOJSON: &str = r#"{
  "code": "Ok",
  "routes": [{
    "geometry": {
      "type": "LineString",
      "coordinates": [
        [-115.165712, 36.126501],
        [-115.170842, 36.121733],
        [-115.172431, 36.112080],
        [-115.169012, 36.102473]
      ]
    },
    "legs": [{"summary": "", "weight": 512.3, "duration": 498.1, "distance": 3391.7}],
    "weight_name": "routability",
    "weight": 512.3,
    "duration": 498.1,
    "distance": 3391.7
  }],
  "waypoints": [
    {"hint": "", "distance": 12.1, "name": "", "location": [-115.165712, 36.126501]},
    {"hint": "", "distance": 4.3, "name": "", "location": [-115.169012, 36.102473]}
  ]
}"#;

/// OSRM route whose geometry came back as an encoded polyline.
pub const OSRM_POLYLINE: &str = r#"{
  "code": "Ok",
  "routes": [{"geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@", "duration": 39600.0, "distance": 780000.0}]
}"#;

pub const OSRM_NO_ROUTE: &str = r#"{"code": "NoRoute", "message": "Impossible route between points", "routes": []}"#;

pub const OSRM_EMPTY_ROUTES: &str = r#"{"code": "Ok", "routes": [], "waypoints": []}"#;

/// Mapbox Directions, Bellagio -> Caesars on foot.
pub const MAPBOX_GEOJSON: &str = r#"{
  "routes": [{
    "weight_name": "pedestrian",
    "weight": 611.4,
    "duration": 540.2,
    "distance": 751.3,
    "legs": [],
    "geometry": {
      "coordinates": [[-115.176612, 36.112654], [-115.175901, 36.114211], [-115.174611, 36.116105]],
      "type": "LineString"
    }
  }],
  "waypoints": [],
  "code": "Ok",
  "uuid": "fixture"
}"#;

pub const MAPBOX_UNAUTHORIZED: &str = r#"{"message": "Not Authorized - Invalid Token"}"#;

/// OpenRouteService GeoJSON, Rennes -> Nantes by car.
pub const ORS_FEATURE_COLLECTION: &str = r#"{
  "type": "FeatureCollection",
  "bbox": [-1.6778, 47.2184, -1.5536, 48.1173],
  "features": [{
    "bbox": [-1.6778, 47.2184, -1.5536, 48.1173],
    "type": "Feature",
    "properties": {
      "segments": [],
      "summary": {"distance": 107234.5, "duration": 4380.1},
      "way_points": [0, 3]
    },
    "geometry": {
      "coordinates": [[-1.677712, 48.117388], [-1.650231, 47.887420], [-1.581030, 47.455001], [-1.553512, 47.218499]],
      "type": "LineString"
    }
  }],
  "metadata": {"attribution": "openrouteservice.org | OpenStreetMap contributors", "service": "routing"}
}"#;

pub const ORS_UNROUTABLE: &str = r#"{"error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters of specified coordinate 0: -1.6778000 48.1173000."}, "info": {"engine": {"version": "7.1.0"}}}"#;

/// OSRM route whose polyline deltas run far past the 32-bit range of the format.
pub const OSRM_OVERSIZED_POLYLINE: &str = r#"{
  "code": "Ok",
  "routes": [{"geometry": "}~~~~~~~~~~~E}~~~~~~~~~~~E}~~~~~~~~~~~E}~~~~~~~~~~~E}~~~~~~~~~~~E}~~~~~~~~~~~E", "duration": 1.0, "distance": 1.0}]
}"#;
