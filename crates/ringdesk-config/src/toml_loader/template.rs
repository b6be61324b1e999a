//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# ringdesk configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[app]
# url = "https://app.ringcentral.com"
# title = "RingCentral (Community)"
# user_agent = "Mozilla/5.0 ..."    # unset: webview default, shell token stripped
# devtools = false

[window]
# width = 1200            # 320-8192
# height = 800            # 240-8192
# min_width = 640
# min_height = 480

[links]
# Links opened by the page with these prefixes become in-app windows;
# any other http(s) link goes to the system browser.
# in_app_prefixes = ["https://v.ringcentral.com"]
# Meeting links always go to the system browser.
# external_patterns = ["https://meetings.ringcentral.com"]

[capture]
# selection = "detect"    # detect | auto | manual

[logging]
# level = "INFO"          # DEBUG | INFO | WARNING | ERROR
"##
}
