//! Global CSS styles for the Agora landing page.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* Backgrounds */
  --paper: #faf7f2;
  --paper-deep: #f0ebe1;
  --ink: #1f2421;

  /* Accents */
  --forest: #2f5d50;
  --forest-light: #4f8a78;
  --clay: #c8643b;
  --clay-glow: rgba(200, 100, 59, 0.25);

  /* Text */
  --text-primary: #1f2421;
  --text-secondary: rgba(31, 36, 33, 0.72);
  --text-muted: rgba(31, 36, 33, 0.5);

  /* Typography */
  --font-serif: 'Cormorant Garamond', Georgia, serif;
  --font-sans: 'Inter', 'Helvetica Neue', Arial, sans-serif;

  /* Type Scale */
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.75rem;
  --text-3xl: 3.5rem;

  /* Transitions */
  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--paper);
  color: var(--text-primary);
  line-height: 1.6;
}

/* === Page === */
.landing {
  height: 100vh;
  overflow-x: hidden;
}

.hero {
  padding: 8rem 2rem 5rem;
  text-align: center;
  background: linear-gradient(160deg, var(--forest) 0%, var(--forest-light) 100%);
  color: var(--paper);
}

.page-title {
  font-family: var(--font-serif);
  font-size: var(--text-3xl);
  font-weight: 500;
  letter-spacing: 0.08em;
}

.tagline {
  margin-top: 1rem;
  font-size: var(--text-lg);
  opacity: 0.85;
}

section {
  max-width: 1100px;
  margin: 0 auto;
  padding: 4rem 2rem;
}

.section-header {
  font-family: var(--font-serif);
  font-size: var(--text-xl);
  font-weight: 500;
  color: var(--forest);
  margin-bottom: 2rem;
}

.body-text {
  color: var(--text-secondary);
  max-width: 60ch;
}

/* === Gallery === */
.gallery-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1.5rem;
}

.gallery-item {
  border-radius: 12px;
  overflow: hidden;
  background: var(--paper-deep);
  transition: transform var(--transition-normal), box-shadow var(--transition-normal);
}

.gallery-item:hover {
  transform: translateY(-6px);
  box-shadow: 0 12px 30px var(--clay-glow);
}

.gallery-item img {
  display: block;
  width: 100%;
  height: 200px;
  object-fit: cover;
}

.gallery-placeholder {
  height: 200px;
  display: flex;
  align-items: center;
  justify-content: center;
  color: var(--text-muted);
}

.image-caption {
  padding: 0.75rem 1rem;
  font-size: var(--text-sm);
  color: var(--text-secondary);
}

/* === Events === */
.events-list {
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.event-card {
  display: flex;
  gap: 1.5rem;
  padding: 1.5rem;
  border-radius: 12px;
  background: white;
  border: 1px solid var(--paper-deep);
  cursor: pointer;
  transition: transform var(--transition-fast), border-color var(--transition-fast);
}

.event-card:hover {
  transform: translateY(-3px);
  border-color: var(--clay);
}

.event-date {
  min-width: 72px;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  border-radius: 8px;
  background: var(--forest);
  color: var(--paper);
}

.event-date .day {
  font-size: var(--text-xl);
  font-weight: 600;
}

.event-date .month {
  font-size: var(--text-sm);
  text-transform: uppercase;
}

.event-content h3 {
  font-family: var(--font-serif);
  font-size: var(--text-lg);
  margin-bottom: 0.25rem;
}

.event-content p {
  color: var(--text-secondary);
}

.event-meta {
  display: flex;
  gap: 1.5rem;
  margin-top: 0.5rem;
  font-size: var(--text-sm);
  color: var(--clay);
}

/* === Event Modal === */
.event-modal {
  position: fixed;
  inset: 0;
  display: none;
  align-items: center;
  justify-content: center;
  background: rgba(31, 36, 33, 0.6);
  z-index: 100;
}

.event-modal.active {
  display: flex;
}

.modal-content {
  position: relative;
  width: min(600px, 90vw);
  max-height: 85vh;
  overflow-y: auto;
  padding: 2.5rem;
  border-radius: 16px;
  background: var(--paper);
}

.modal-close {
  position: absolute;
  top: 1rem;
  right: 1rem;
  border: none;
  background: transparent;
  font-size: 1.75rem;
  cursor: pointer;
  color: var(--text-muted);
}

.modal-date {
  display: inline-flex;
  gap: 0.5rem;
  padding: 0.25rem 0.75rem;
  border-radius: 6px;
  background: var(--forest);
  color: var(--paper);
}

.modal-title {
  font-family: var(--font-serif);
  font-size: var(--text-xl);
  margin: 1rem 0 0.5rem;
}

.modal-meta {
  display: flex;
  gap: 1.5rem;
  font-size: var(--text-sm);
  color: var(--clay);
}

.modal-description {
  margin-top: 1.5rem;
  white-space: pre-wrap;
}
"#;
