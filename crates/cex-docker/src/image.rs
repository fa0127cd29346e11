/// Split an image reference into the `fromImage` and `tag` pull parameters.
///
/// A digest (`name@sha256:…`) is passed as the tag. A colon only counts as a
/// tag separator after the last `/`, so registry ports survive. Missing tag
/// defaults to `latest`.
pub fn split_image_ref(image: &str) -> (String, String) {
    if let Some((repo, digest)) = image.split_once('@') {
        return (repo.to_string(), digest.to_string());
    }

    let name_start = image.rfind('/').map_or(0, |i| i + 1);
    match image[name_start..].rfind(':') {
        Some(i) => {
            let split = name_start + i;
            (image[..split].to_string(), image[split + 1..].to_string())
        }
        None => (image.to_string(), "latest".to_string()),
    }
}
