//! ページテンプレートのレンダリング
//!
//! テンプレートはビルド時にバイナリへ埋め込む。

use crate::common::error::LandingResult;
use minijinja::{context, Environment, Value};
use serde::Serialize;

/// レイアウトテンプレート
pub const LAYOUT_TEMPLATE: &str = "index.html";

/// 404テンプレート
pub const NOT_FOUND_TEMPLATE: &str = "errors/404.html";

const TEMPLATES: &[(&str, &str)] = &[
    (LAYOUT_TEMPLATE, include_str!("../../templates/index.html")),
    (
        NOT_FOUND_TEMPLATE,
        include_str!("../../templates/errors/404.html"),
    ),
    (
        "guest/landingpage.html",
        include_str!("../../templates/guest/landingpage.html"),
    ),
    (
        "guest/tandc.html",
        include_str!("../../templates/guest/tandc.html"),
    ),
    (
        "guest/privacypolicy.html",
        include_str!("../../templates/guest/privacypolicy.html"),
    ),
    (
        "guest/aimodels.html",
        include_str!("../../templates/guest/aimodels.html"),
    ),
    (
        "guest/aiproducts.html",
        include_str!("../../templates/guest/aiproducts.html"),
    ),
    (
        "guest/support.html",
        include_str!("../../templates/guest/support.html"),
    ),
    (
        "guest/pricing.html",
        include_str!("../../templates/guest/pricing.html"),
    ),
];

/// レイアウトに渡すページ情報
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    /// ナビゲーションで強調する項目
    pub active_page: &'a str,
    /// 本文テンプレートのID（例: `guest/pricing`）
    pub content_file: &'a str,
    /// `<title>`
    pub page_title: &'a str,
    /// 訪問者のセッション識別子
    pub session_id: &'a str,
}

/// テンプレートレンダラー
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// 埋め込みテンプレートを読み込んで作成
    pub fn new() -> LandingResult<Self> {
        let mut env = Environment::new();
        env.add_filter("text", text_filter);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// レイアウトに本文を差し込んでレンダリングする
    pub fn render_page(&self, view: &PageView<'_>) -> LandingResult<String> {
        let template = self.env.get_template(LAYOUT_TEMPLATE)?;
        Ok(template.render(view)?)
    }

    /// 404ページをレンダリングする
    pub fn render_not_found(&self, requested_path: &str) -> LandingResult<String> {
        let template = self.env.get_template(NOT_FOUND_TEMPLATE)?;
        Ok(template.render(context! {
            page_title => "404 Not Found",
            requested_path => requested_path,
        })?)
    }
}

/// 本文テキスト用のエスケープ
///
/// 標準のHTMLエスケープは `/` も置換するため、パスをそのまま表示したい箇所で使う。
fn text_filter(value: String) -> Value {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Value::from_safe_string(out)
}
