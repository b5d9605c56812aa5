/// Declares a GET endpoint on [`SolarManagerClient`](crate::SolarManagerClient).
///
/// Every path parameter is a `&str` that is escaped into its own URL segment; every
/// query parameter accepts anything `AsRef<str>` and is sent under its own name.
/// Besides the async accessor, a `<name>_url` method returning the exact request URL
/// is generated.
macro_rules! define_api_endpoint {
    (
        $(#[$meta:meta])*
        fn $fn_name:ident($($path_param:ident),* $(,)?) -> $response_type:ty;
        path: [$($segment:expr),+ $(,)?];
        $(query: [$($query_param:ident),+ $(,)?];)?
    ) => {
        paste::paste! {
            impl $crate::client::SolarManagerClient {
                $(#[$meta])*
                #[tracing::instrument(skip_all, fields($($path_param = %$path_param),*))]
                pub async fn $fn_name(
                    &self,
                    $($path_param: &str,)*
                    $($($query_param: impl AsRef<str>,)+)?
                ) -> $crate::client::ApiResult<$response_type> {
                    let url = self.[<$fn_name _url>]($($path_param,)* $($($query_param,)+)?)?;
                    tracing::debug!("Sending GET request to URL: {}", url);
                    let request = self.new_request(reqwest::Method::GET, url, None::<&()>)?;
                    self.execute(request).await
                }

                #[doc = concat!("Request URL of [`Self::", stringify!($fn_name), "`].")]
                pub fn [<$fn_name _url>](
                    &self,
                    $($path_param: &str,)*
                    $($($query_param: impl AsRef<str>,)+)?
                ) -> $crate::client::ApiResult<reqwest::Url> {
                    #[allow(unused_mut)]
                    let mut url = self.endpoint_url(&[$($segment),+])?;
                    $($(
                        url.query_pairs_mut()
                            .append_pair(stringify!($query_param), $query_param.as_ref());
                    )+)?
                    Ok(url)
                }
            }
        }
    };
}
