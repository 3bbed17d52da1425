//! Stylesheet injected once per page, under [`STYLE_ELEMENT_ID`].

pub const STYLE_ELEMENT_ID: &str = "fp-styles";

pub const STYLESHEET: &str = r#"
#fp-root {
  --fp-primary: #4f46e5;
  --fp-primary-hover: #4338ca;
  --fp-surface: #ffffff;
  --fp-text: #111827;
  --fp-muted: #6b7280;
  --fp-border: #e5e7eb;
  --fp-star: #f59e0b;
  --fp-danger: #dc2626;
  --fp-radius: 12px;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
}
.fp-widget-btn {
  position: fixed; right: 20px; bottom: 20px; z-index: 2147483000;
  display: flex; align-items: center; gap: 8px;
  padding: 12px 18px; border: 0; border-radius: 999px;
  background: var(--fp-primary); color: #fff; font-size: 14px; font-weight: 600;
  box-shadow: 0 8px 24px rgba(79, 70, 229, 0.35); cursor: pointer;
  transition: background 0.2s, transform 0.2s;
}
.fp-widget-btn:hover { background: var(--fp-primary-hover); transform: translateY(-1px); }
.fp-widget-btn svg { width: 18px; height: 18px; }
.fp-modal-overlay {
  position: fixed; inset: 0; z-index: 2147483001;
  display: flex; align-items: center; justify-content: center;
  background: rgba(17, 24, 39, 0.5);
  opacity: 0; visibility: hidden; transition: opacity 0.3s, visibility 0.3s;
}
.fp-modal-overlay.fp-open { opacity: 1; visibility: visible; }
.fp-modal {
  position: relative; width: min(420px, calc(100vw - 32px));
  padding: 24px; border-radius: var(--fp-radius);
  background: var(--fp-surface); color: var(--fp-text);
  box-shadow: 0 24px 48px rgba(0, 0, 0, 0.2);
  transform: translateY(12px) scale(0.98); transition: transform 0.3s;
}
.fp-modal-overlay.fp-open .fp-modal { transform: none; }
.fp-close {
  position: absolute; top: 12px; right: 12px;
  border: 0; background: none; color: var(--fp-muted); cursor: pointer;
}
.fp-close svg { width: 20px; height: 20px; }
.fp-title { margin: 0 0 4px; font-size: 18px; font-weight: 700; }
.fp-desc { margin: 0 0 16px; font-size: 14px; color: var(--fp-muted); }
.fp-error {
  margin-bottom: 12px; padding: 8px 12px; border-radius: 8px;
  background: #fef2f2; color: var(--fp-danger); font-size: 13px;
}
.fp-types { display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px; margin-bottom: 16px; }
.fp-type {
  display: flex; flex-direction: column; align-items: center; gap: 4px;
  padding: 10px 6px; border: 1px solid var(--fp-border); border-radius: 8px;
  background: none; color: var(--fp-text); font-size: 13px; cursor: pointer;
}
.fp-type svg { width: 20px; height: 20px; }
.fp-type.fp-active { border-color: var(--fp-primary); color: var(--fp-primary); background: #eef2ff; }
.fp-rating { display: flex; gap: 4px; margin-bottom: 16px; }
.fp-star { border: 0; background: none; padding: 2px; color: var(--fp-border); cursor: pointer; }
.fp-star svg { width: 28px; height: 28px; }
.fp-star.fp-active { color: var(--fp-star); }
.fp-textarea, .fp-input {
  box-sizing: border-box; width: 100%; margin-bottom: 12px; padding: 10px 12px;
  border: 1px solid var(--fp-border); border-radius: 8px; font: inherit; font-size: 14px;
}
.fp-textarea { min-height: 110px; resize: vertical; }
.fp-submit {
  display: flex; align-items: center; justify-content: center; width: 100%;
  padding: 12px; border: 0; border-radius: 8px;
  background: var(--fp-primary); color: #fff; font-size: 14px; font-weight: 600; cursor: pointer;
}
.fp-submit:disabled { opacity: 0.7; cursor: default; }
.fp-spinner {
  width: 18px; height: 18px; border: 2px solid rgba(255, 255, 255, 0.4);
  border-top-color: #fff; border-radius: 50%; animation: fp-spin 0.8s linear infinite;
}
@keyframes fp-spin { to { transform: rotate(360deg); } }
.fp-success { text-align: center; padding: 16px 0; }
.fp-success-icon { width: 56px; height: 56px; margin: 0 auto 12px; color: #16a34a; }
.fp-success-icon svg { width: 100%; height: 100%; }
"#;
