//! ユーティリティモジュール

pub mod cache;
pub mod log_trace;

use base64::Engine;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Request, RequestInit, RequestMode, Response, Url};

use crate::models::GrammarCheckResult;

const SHARE_PREFIX: &str = "#data=";

/// Base64エンコード
pub fn encode_base64(data: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(data.as_bytes())
}

/// Base64デコード
pub fn decode_base64(data: &str) -> Option<String> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// チェック結果を "#data=<base64>" 形式のフラグメントにする
pub fn encode_share_fragment(result: &GrammarCheckResult) -> Result<String, String> {
    let json = serde_json::to_string(result).map_err(|e| format!("シリアライズ失敗: {}", e))?;
    Ok(format!("{}{}", SHARE_PREFIX, encode_base64(&json)))
}

/// "#data=<base64>" を読み取る。形式が違えば None、中身が壊れていれば Err
pub fn decode_share_fragment(hash: &str) -> Option<Result<GrammarCheckResult, String>> {
    let encoded = hash.strip_prefix(SHARE_PREFIX)?;
    let parsed = decode_base64(encoded)
        .ok_or_else(|| "共有データのBase64デコードに失敗しました".to_string())
        .and_then(|json| {
            serde_json::from_str(&json).map_err(|e| format!("共有データのJSON解析エラー: {}", e))
        });
    Some(parsed)
}

/// URLハッシュからチェック結果を取得
pub fn get_hash_data() -> Option<Result<GrammarCheckResult, String>> {
    let hash = web_sys::window()?.location().hash().ok()?;
    decode_share_fragment(&hash)
}

/// 共有URLを生成
pub fn build_share_url(result: &GrammarCheckResult) -> Result<String, String> {
    let fragment = encode_share_fragment(result)?;
    let window = web_sys::window().ok_or("windowがありません")?;
    let location = window.location();
    let base_url = format!(
        "{}//{}{}",
        location.protocol().map_err(|e| format!("{:?}", e))?,
        location.host().map_err(|e| format!("{:?}", e))?,
        location.pathname().map_err(|e| format!("{:?}", e))?
    );
    Ok(format!("{}{}", base_url, fragment))
}

/// チェック結果JSONをfetch
pub async fn fetch_check_result(url: &str) -> Result<GrammarCheckResult, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("Request作成失敗: {:?}", e))?;

    let window = web_sys::window().ok_or("windowがありません")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch失敗: {:?}", e))?;

    let resp: Response = resp_value.dyn_into().map_err(|_| "Responseへの変換失敗")?;
    if !resp.ok() {
        return Err(format!("HTTP {}: {}", resp.status(), url));
    }

    let json = JsFuture::from(resp.json().map_err(|e| format!("json()失敗: {:?}", e))?)
        .await
        .map_err(|e| format!("JSON解析失敗: {:?}", e))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("デシリアライズ失敗: {:?}", e))
}

/// テキストをファイルとしてダウンロードさせる
pub fn download_text(filename: &str, mime: &str, contents: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("documentがありません")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob作成失敗: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|e| format!("URL作成失敗: {:?}", e))?;

    let link = document
        .create_element("a")
        .map_err(|e| format!("リンク作成失敗: {:?}", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "HtmlElementへの変換失敗")?;
    let clicked = link
        .set_attribute("href", &url)
        .and_then(|_| link.set_attribute("download", filename))
        .map(|_| link.click())
        .map_err(|e| format!("ダウンロード失敗: {:?}", e));
    let _ = Url::revoke_object_url(&url);
    clicked
}

/// テキストをクリップボードにコピー
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("windowがありません")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("クリップボードへのコピー失敗: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckSummary, ErrorType, GrammarError};

    #[test]
    fn test_base64_utf8() {
        let encoded = encode_base64("日本語 text");
        assert_eq!(decode_base64(&encoded).as_deref(), Some("日本語 text"));
        assert_eq!(decode_base64("%%%"), None);
    }

    #[test]
    fn test_share_fragment() {
        let result = GrammarCheckResult {
            text: "Teh cat".to_string(),
            errors: vec![GrammarError {
                id: "e1".to_string(),
                error_type: ErrorType::Spelling,
                message: "Misspelled word".to_string(),
                suggestion: Some("The".to_string()),
                start_index: 0,
                end_index: 3,
                original_text: "Teh".to_string(),
            }],
            summary: CheckSummary::default(),
        };
        let fragment = encode_share_fragment(&result).unwrap();
        assert!(fragment.starts_with("#data="));

        let decoded = decode_share_fragment(&fragment).unwrap().unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_share_fragment_other_hash() {
        assert!(decode_share_fragment("").is_none());
        assert!(decode_share_fragment("#section-2").is_none());
    }

    #[test]
    fn test_share_fragment_broken_payload() {
        assert!(decode_share_fragment("#data=!!!").unwrap().is_err());
        let not_json = format!("#data={}", encode_base64("not json"));
        assert!(decode_share_fragment(&not_json).unwrap().is_err());
    }
}
