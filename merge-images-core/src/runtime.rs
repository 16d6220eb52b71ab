//! Source of the runtime-support ES module that application code imports `getImageStyle` from.
//!
//! It has no imports of its own and computes exactly what [`get_image_style`](crate::get_image_style)
//! computes, including the error message for unknown names.

pub const RUNTIME_SOURCE: &str = r#"function num(value) {
  return value === 0 ? "0" : String(value);
}

export function getImageStyle(coords, name, scale = 1) {
  const rect = Object.prototype.hasOwnProperty.call(coords, name) ? coords[name] : undefined;
  if (!rect) {
    throw new Error(`image "${name}" not found in coordinate table`);
  }
  if (typeof scale !== "number" || !Number.isFinite(scale) || scale <= 0) {
    throw new Error(`scale must be a positive finite number, got ${scale}`);
  }
  const shrink = 1 - scale;
  return {
    width: `${rect.width}px`,
    height: `${rect.height}px`,
    objectFit: "none",
    objectPosition: `-${rect.x}px -${rect.y}px`,
    transform: `scale(${num(scale)})`,
    transformOrigin: "top left",
    marginBottom: `${num(-(rect.height * shrink))}px`,
    marginRight: `${num(-(rect.width * shrink))}px`,
  };
}
"#;
