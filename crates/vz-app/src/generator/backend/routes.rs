//! Endpoint addresses of the remote API.

fn base(host: &str) -> &str {
    host.trim_end_matches('/')
}

pub fn upload_url(api_base: &str) -> String {
    format!("{}/get-emd-upload-url", base(api_base))
}

pub fn image_gen_url(api_base: &str) -> String {
    format!("{}/image-gen", base(api_base))
}

pub fn job_status_url(api_base: &str, user_id: &str, job_id: &str) -> String {
    format!("{}/image-gen/{}/{}/status", base(api_base), user_id, job_id)
}

pub fn download_proxy_url(api_base: &str) -> String {
    format!("{}/download-proxy", base(api_base))
}

/// Where the content host serves an uploaded file.
pub fn content_url(content_base: &str, file_name: &str) -> String {
    format!("{}/{}", base(content_base), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_url() {
        assert_eq!(
            job_status_url("https://api.example.com/", "u1", "j9"),
            "https://api.example.com/image-gen/u1/j9/status"
        );
    }

    #[test]
    fn test_content_url() {
        assert_eq!(
            content_url("https://contents.example.com", "abc.png"),
            "https://contents.example.com/abc.png"
        );
    }
}
